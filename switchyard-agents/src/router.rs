use serde::{Deserialize, Serialize};

const ANALYSIS_KEYWORDS: [&str; 4] = ["why", "because", "explain", "analysis"];

/// Which agent answers a message.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Todo,
    Analysis,
    Echo,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Todo, Route::Analysis, Route::Echo];

    /// Graph node name for this agent.
    pub fn as_str(self) -> &'static str {
        match self {
            Route::Todo => "todo_agent",
            Route::Analysis => "analysis_agent",
            Route::Echo => "echo_agent",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive keyword match, first hit wins: "todo" beats the analysis
/// keywords, and anything else falls through to echo.
pub fn route(content: &str) -> Route {
    let lowered = content.to_lowercase();
    if lowered.contains("todo") {
        Route::Todo
    } else if ANALYSIS_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        Route::Analysis
    } else {
        Route::Echo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_wins_over_analysis_keywords() {
        assert_eq!(route("todo: explain why"), Route::Todo);
    }

    #[test]
    fn matching_is_substring_based() {
        assert_eq!(route("Todos for today"), Route::Todo);
        assert_eq!(route("somewhy"), Route::Analysis);
        assert_eq!(route(""), Route::Echo);
    }

    #[test]
    fn node_names_are_distinct() {
        let names: std::collections::HashSet<_> = Route::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(names.len(), 3);
        assert_eq!(Route::Analysis.to_string(), "analysis_agent");
    }
}
