//! Runtime platform naming
//!
//! Maps the OS identifier reported by the Rust runtime (`std::env::consts::OS`)
//! to the human label used in the user agent and `sec-ch-ua-platform` header.

/// Human-readable label for an OS identifier
///
/// The kernel names are rewritten to their marketing names, anything else is
/// capitalised as-is.
///
/// # Example
/// ```
/// use buyeuropean::platform::platform_label;
///
/// assert_eq!(platform_label("macos"), "macOS");
/// assert_eq!(platform_label("linux"), "Linux");
/// assert_eq!(platform_label("freebsd"), "Freebsd");
/// ```
pub fn platform_label(os: &str) -> String {
    match os.to_ascii_lowercase().as_str() {
        "macos" | "darwin" => "macOS".to_string(),
        "ios" => "iOS".to_string(),
        "linux" => "Linux".to_string(),
        "windows" => "Windows".to_string(),
        "android" => "Android".to_string(),
        _ => capitalise(os),
    }
}

/// Label for the platform this binary is running on
pub fn current_platform_label() -> String {
    platform_label(std::env::consts::OS)
}

fn capitalise(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Unknown".to_string(),
    }
}
