//! Travis CI provider

use super::{
    parse_branch, parse_optional, parse_pull_request, CiProvider, EnvMap, ExecutionContext,
};

/// Travis CI environment mapping
///
/// Travis sets `TRAVIS=true` on every build; `TRAVIS_PULL_REQUEST` carries
/// the PR number for PR builds and the literal string "false" otherwise.
pub struct TravisCi;

impl CiProvider for TravisCi {
    fn name(&self) -> &'static str {
        "travis"
    }

    fn is_active(&self, env: &EnvMap) -> bool {
        env.get_bool("TRAVIS")
    }

    fn context(&self, env: &EnvMap) -> ExecutionContext {
        ExecutionContext {
            is_ci: true,
            current_branch: parse_branch(env.get("TRAVIS_BRANCH")),
            pull_request: parse_pull_request(env.get("TRAVIS_PULL_REQUEST")),
            repo_slug: parse_branch(env.get("TRAVIS_REPO_SLUG")),
            commit_range: parse_optional(env.get("TRAVIS_COMMIT_RANGE")),
            provider: self.name(),
        }
    }
}
