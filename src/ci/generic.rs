//! Provider-agnostic CI environment mapping

use super::{
    parse_branch, parse_optional, parse_pull_request, CiProvider, EnvMap, ExecutionContext,
};

/// Generic CI provider driven by plain variable names
///
/// Used when no specific provider is detected but `CI_RUNNING` is set, and
/// by wrapper scripts that translate their provider's variables themselves.
pub struct GenericCi;

impl CiProvider for GenericCi {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn is_active(&self, env: &EnvMap) -> bool {
        env.get("CI_RUNNING").is_some()
    }

    fn context(&self, env: &EnvMap) -> ExecutionContext {
        ExecutionContext {
            is_ci: env.get_bool("CI_RUNNING"),
            current_branch: parse_branch(env.get("CURRENT_BRANCH")),
            pull_request: parse_pull_request(env.get("IS_PULL_REQUEST")),
            repo_slug: parse_branch(env.get("REPO_SLUG")),
            commit_range: parse_optional(env.get("COMMIT_RANGE")),
            provider: self.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generic_build() {
        let env = EnvMap::from_pairs([
            ("CI_RUNNING", "true"),
            ("CURRENT_BRANCH", "master"),
            ("IS_PULL_REQUEST", "false"),
            ("REPO_SLUG", "owner/project"),
        ]);
        let ctx = GenericCi.context(&env);

        assert!(ctx.is_ci);
        assert_eq!(ctx.current_branch.as_deref(), Some("master"));
        assert_eq!(ctx.pull_request, None);
        assert_eq!(ctx.repo_slug.as_deref(), Some("owner/project"));
        assert_eq!(ctx.commit_range, None);
    }

    #[test]
    fn test_generic_ci_running_false_is_not_ci() {
        let env = EnvMap::from_pairs([("CI_RUNNING", "false")]);
        let ctx = GenericCi.context(&env);

        assert!(GenericCi.is_active(&env));
        assert!(!ctx.is_ci);
    }
}
