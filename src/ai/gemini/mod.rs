pub mod classify;
pub mod client;
pub mod edit;
pub mod types;

pub use classify::{classify, classify_with_text, EditOutcome};
pub use client::GeminiHttpClient;
pub use edit::GeminiImageEditor;

#[cfg(test)]
pub(crate) mod test_support {
    use wiremock::matchers::{method, path_regex};
    use wiremock::MockBuilder;

    pub const GENERATE_CONTENT_PATH_REGEX: &str = r"^/v1beta/models/[^/]+:generateContent$";

    pub fn post_path_regex(pattern: &str) -> MockBuilder {
        wiremock::Mock::given(method("POST")).and(path_regex(pattern))
    }
}
