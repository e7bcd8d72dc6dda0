//! Minimal robots.txt parsing for the optional pre-fetch policy check.

/// Whether capture fetches are checked against the archive's robots.txt.
///
/// Disabled by default; the check exists as a re-enableable hook, not as
/// part of the default fetch contract.
#[derive(Debug, Clone, Default)]
pub enum RobotsPolicy {
    /// No robots.txt lookups at all (the default).
    #[default]
    Disabled,

    /// Fetch and honor robots.txt before each capture fetch.
    Enforced { user_agent: String },
}

impl RobotsPolicy {
    /// Enforce robots.txt as the given user agent.
    pub fn enforced(user_agent: impl Into<String>) -> Self {
        Self::Enforced {
            user_agent: user_agent.into(),
        }
    }
}

/// Parsed robots.txt rules, reduced to allow/disallow path prefixes grouped
/// per user agent.
#[derive(Debug, Clone, Default)]
pub struct RobotsRules {
    groups: Vec<AgentGroup>,
}

#[derive(Debug, Clone, Default)]
struct AgentGroup {
    /// Lowercased user-agent patterns this group applies to.
    agents: Vec<String>,
    allow: Vec<String>,
    disallow: Vec<String>,
}

impl AgentGroup {
    fn has_rules(&self) -> bool {
        !self.allow.is_empty() || !self.disallow.is_empty()
    }

    fn matches(&self, agent_lower: &str) -> bool {
        self.agents
            .iter()
            .any(|a| a != "*" && agent_lower.contains(a.as_str()))
    }

    fn is_wildcard(&self) -> bool {
        self.agents.iter().any(|a| a == "*")
    }

    fn allows(&self, path: &str) -> bool {
        // Allow prefixes take precedence over disallow.
        if self.allow.iter().any(|p| path.starts_with(p)) {
            return true;
        }
        !self
            .disallow
            .iter()
            .any(|p| p == "/" || path.starts_with(p.as_str()))
    }
}

impl RobotsRules {
    /// Parse robots.txt content. Unknown directives and comments are
    /// ignored; an empty or absent file allows everything.
    pub fn parse(content: &str) -> Self {
        let mut groups: Vec<AgentGroup> = Vec::new();
        let mut current = AgentGroup::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((directive, value)) = line.split_once(':') else {
                continue;
            };
            let directive = directive.trim().to_lowercase();
            let value = value.trim();

            match directive.as_str() {
                "user-agent" => {
                    // A user-agent line after rules starts a new group.
                    if current.has_rules() {
                        groups.push(std::mem::take(&mut current));
                    }
                    current.agents.push(value.to_lowercase());
                }
                "disallow" if !value.is_empty() => {
                    current.disallow.push(value.to_string());
                }
                "allow" if !value.is_empty() => {
                    current.allow.push(value.to_string());
                }
                _ => {}
            }
        }

        if !current.agents.is_empty() {
            groups.push(current);
        }

        Self { groups }
    }

    /// Check whether a path is allowed for a user agent. The most specific
    /// matching group wins; absent any match, the wildcard group applies;
    /// absent that, everything is allowed.
    pub fn is_allowed(&self, user_agent: &str, path: &str) -> bool {
        let agent_lower = user_agent.to_lowercase();

        let group = self
            .groups
            .iter()
            .find(|g| g.matches(&agent_lower))
            .or_else(|| self.groups.iter().find(|g| g.is_wildcard()));

        match group {
            Some(group) => group.allows(path),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let content = "\
User-agent: *
Disallow: /private/
Disallow: /admin/
Allow: /public/";

        let rules = RobotsRules::parse(content);

        assert!(rules.is_allowed("TestBot", "/public/page"));
        assert!(!rules.is_allowed("TestBot", "/private/page"));
        assert!(!rules.is_allowed("TestBot", "/admin/"));
        assert!(rules.is_allowed("TestBot", "/other/page"));
    }

    #[test]
    fn test_specific_agent_overrides_wildcard() {
        let content = "\
User-agent: *
Disallow: /

User-agent: goodbot
Allow: /";

        let rules = RobotsRules::parse(content);

        assert!(!rules.is_allowed("BadBot", "/page"));
        assert!(rules.is_allowed("GoodBot/1.0", "/page"));
    }

    #[test]
    fn test_allow_overrides_disallow() {
        let content = "\
User-agent: *
Disallow: /web/
Allow: /web/open/";

        let rules = RobotsRules::parse(content);

        assert!(!rules.is_allowed("Bot", "/web/secret"));
        assert!(rules.is_allowed("Bot", "/web/open/page"));
    }

    #[test]
    fn test_empty_content_allows_everything() {
        let rules = RobotsRules::parse("");
        assert!(rules.is_allowed("AnyBot", "/any/path"));
    }

    #[test]
    fn test_disallow_all() {
        let rules = RobotsRules::parse("User-agent: *\nDisallow: /");
        assert!(!rules.is_allowed("Bot", "/anything"));
    }

    #[test]
    fn test_comments_and_unknown_directives_ignored() {
        let content = "\
# archive policy
User-agent: *
Crawl-delay: 5
Disallow: /blocked/";

        let rules = RobotsRules::parse(content);
        assert!(!rules.is_allowed("Bot", "/blocked/x"));
        assert!(rules.is_allowed("Bot", "/ok"));
    }

    #[test]
    fn test_default_policy_is_disabled() {
        assert!(matches!(RobotsPolicy::default(), RobotsPolicy::Disabled));
    }
}
