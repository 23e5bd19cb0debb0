#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{
        stage_result::{NaiveApproach, OptimalApproach, Pitfall, RelatedProblem, WorkedExample},
        ConceptsResult, PitfallsResult, SolutionsResult,
    };

    /// A short pasted problem statement that needs no normalization.
    pub const TWO_SUM: &str = "Given an array nums and target, return indices of two numbers that add up to target.";

    pub const LEETCODE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Two Sum - LeetCode</title>
  <meta property="og:description" content="Can you solve this real interview question? Two Sum - Given an array of integers nums and an integer target...">
</head>
<body>
  <div class="flex h-full w-full">
    <nav class="navbar">Sign in Register Premium</nav>
    <div class="elfjS" data-track-load="description_content">
      <p>Given an array of integers nums and an integer target, return indices of the two numbers such that they add up to target.</p>
      <script>window.analytics.trackPageView("problem");</script>
      <p>You may assume that each input would have exactly one solution, and you may not use the same element twice.</p>
      <style>.hidden { display: none; }</style>
      <pre>Input: nums = [2,7,11,15], target = 9
Output: [0,1]</pre>
    </div>
  </div>
</body>
</html>"#;

    pub const OG_DESCRIPTION: &str =
        "Given a string s, find the length of the longest substring without repeating characters.";

    pub const OG_ONLY_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Longest Substring</title>
  <meta property="og:description" content="Given a string s, find the length of the longest substring without repeating characters.">
</head>
<body>
  <div id="app" class="app-shell"><noscript>You need to enable JavaScript to run this app.</noscript></div>
</body>
</html>"#;

    pub const HACKERRANK_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Solve Me First | HackerRank</title></head>
<body>
  <div class="challenge-page">
    <div class="problem-statement">
      <div class="challenge-body-html">
        <p>Complete the function solveMeFirst to compute the sum of two integers.</p>
        <p>Example: a = 7, b = 3. Return 10.</p>
      </div>
    </div>
  </div>
</body>
</html>"#;

    pub const CONCEPTS_JSON: &str = r#"{
  "concepts": ["Hash table", "Array traversal", "Complement search"],
  "prerequisites": ["Arrays", "Big-O notation"],
  "difficulty": "Easy",
  "difficulty_reason": "A single pass with a hash table is enough",
  "analogy": "Like finding matching puzzle pieces in a box"
}"#;

    pub const SOLUTIONS_JSON: &str = r#"{
  "naive_approach": {
    "name": "Brute Force",
    "intuition": "Check every pair of elements",
    "pseudocode": "for i in range(n):\n  for j in range(i+1, n):\n    if nums[i] + nums[j] == target: return [i, j]",
    "time_complexity": "O(n²)",
    "space_complexity": "O(1)",
    "limitation": "Too slow for large inputs"
  },
  "optimal_approach": {
    "name": "Hash Map",
    "key_insight": "Store each value's index and look up its complement",
    "pseudocode": "seen = {}\nfor i, num in enumerate(nums):\n  if target - num in seen: return [seen[target - num], i]\n  seen[num] = i",
    "time_complexity": "O(n)",
    "space_complexity": "O(n)",
    "why_optimal": "Each element is visited once with constant-time lookups"
  },
  "worked_example": {
    "input": "nums = [2, 7, 11, 15], target = 9",
    "steps": ["i=0: complement 7 not seen, store 2", "i=1: complement 2 seen at 0"],
    "output": "[0, 1]"
  }
}"#;

    pub const PITFALLS_JSON: &str = r#"{
  "pitfalls": [
    {"mistake": "Returning the same index twice", "why_fails": "nums[i] + nums[i] may equal target", "fix": "Check the map before inserting the current element"}
  ],
  "edge_cases": ["Negative numbers", "Duplicate values"],
  "related_problems": [
    {"name": "3Sum", "platform": "LeetCode", "difficulty": "Medium", "similarity": "Complement search", "difference": "Needs sorting and two pointers"}
  ]
}"#;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    pub fn concepts_result() -> ConceptsResult {
        ConceptsResult {
            concepts: strings(&["Hash table", "Array traversal", "Complement search"]),
            prerequisites: strings(&["Arrays", "Big-O notation"]),
            difficulty: "Easy".to_string(),
            difficulty_reason: "A single pass with a hash table is enough".to_string(),
            analogy: "Like finding matching puzzle pieces in a box".to_string(),
        }
    }

    pub fn solutions_result() -> SolutionsResult {
        SolutionsResult {
            naive_approach: NaiveApproach {
                name: "Brute Force".to_string(),
                intuition: "Check every pair of elements".to_string(),
                pseudocode: "for i in range(n):\n  for j in range(i+1, n):\n    if nums[i] + nums[j] == target: return [i, j]".to_string(),
                time_complexity: "O(n²)".to_string(),
                space_complexity: "O(1)".to_string(),
                limitation: "Too slow for large inputs".to_string(),
            },
            optimal_approach: OptimalApproach {
                name: "Hash Map".to_string(),
                key_insight: "Store each value's index and look up its complement".to_string(),
                pseudocode: "seen = {}\nfor i, num in enumerate(nums):\n  if target - num in seen: return [seen[target - num], i]\n  seen[num] = i".to_string(),
                time_complexity: "O(n)".to_string(),
                space_complexity: "O(n)".to_string(),
                why_optimal: "Each element is visited once with constant-time lookups".to_string(),
            },
            worked_example: WorkedExample {
                input: "nums = [2, 7, 11, 15], target = 9".to_string(),
                steps: strings(&[
                    "i=0: complement 7 not seen, store 2",
                    "i=1: complement 2 seen at 0",
                ]),
                output: "[0, 1]".to_string(),
            },
        }
    }

    pub fn pitfalls_result() -> PitfallsResult {
        PitfallsResult {
            pitfalls: vec![Pitfall {
                mistake: "Returning the same index twice".to_string(),
                why_fails: "nums[i] + nums[i] may equal target".to_string(),
                fix: "Check the map before inserting the current element".to_string(),
            }],
            edge_cases: strings(&["Negative numbers", "Duplicate values"]),
            related_problems: vec![RelatedProblem {
                name: "3Sum".to_string(),
                platform: "LeetCode".to_string(),
                difficulty: "Medium".to_string(),
                similarity: "Complement search".to_string(),
                difference: "Needs sorting and two pointers".to_string(),
            }],
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_two_sum_fits_in_overview() {
        assert!(TWO_SUM.chars().count() <= crate::models::domain::explanation::OVERVIEW_CHARS);
    }

    #[test]
    fn test_stage_json_matches_typed_fixtures() {
        let concepts: crate::models::domain::ConceptsResult =
            serde_json::from_str(CONCEPTS_JSON).unwrap();
        assert_eq!(concepts, concepts_result());

        let pitfalls: crate::models::domain::PitfallsResult =
            serde_json::from_str(PITFALLS_JSON).unwrap();
        assert_eq!(pitfalls.pitfalls.len(), 1);
        assert_eq!(pitfalls, pitfalls_result());
    }
}
