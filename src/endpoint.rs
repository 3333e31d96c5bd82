//! Endpoint derivation from route-module file paths.
//!
//! A route module's location under the route directory determines the URL it
//! is mounted at: `routes/users/_id.ts` becomes `/users/:id`, and an
//! `index.<ext>` file stands for its containing directory. Derivation is a
//! one-shot path transform, not a dispatch structure; invalid inputs are
//! normalized, never rejected.

use once_cell::sync::Lazy;
use regex::Regex;

/// File extensions recognized as route-module sources.
///
/// `ts`/`js` match the module trees this layer was designed around; `rs` is
/// accepted so registry keys may name Rust module files directly.
pub const SOURCE_EXTENSIONS: [&str; 3] = ["ts", "js", "rs"];

/// Trailing `index.<ext>` filename, with or without a leading slash.
static INDEX_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"(?:^|/)index\.(?:{})$", SOURCE_EXTENSIONS.join("|"));
    Regex::new(&pattern).expect("index regex")
});

/// Trailing recognized source extension.
static EXT_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"\.(?:{})$", SOURCE_EXTENSIONS.join("|"));
    Regex::new(&pattern).expect("extension regex")
});

/// Two or more consecutive slashes.
static MULTI_SLASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/{2,}").expect("slash regex"));

/// Derive the URL endpoint for a route module from its file path.
///
/// The transform, in order:
///
/// 1. Normalize `\` separators to `/` in both inputs.
/// 2. Remove the first occurrence of `base_dir` from `file_path` and strip
///    leading slashes.
/// 3. Replace every `_` with `/:`, turning `_id` into the path parameter
///    `/:id`. The substitution is a blunt global replace, not segment-aware:
///    a filename like `user_profile` is silently mangled into
///    `user/:profile`. Kept as-is for compatibility with existing route
///    trees.
/// 4. Drop a trailing `index.<ext>` entirely (the containing directory
///    becomes the endpoint), otherwise strip a recognized trailing extension.
/// 5. Collapse repeated slashes and strip a trailing slash; an empty result
///    becomes `/`.
///
/// Pure and total: there is no error path. A module named `root.<ext>` at the
/// top of the tree derives to `/root`; remapping that to `/` is the caller's
/// concern (see [`mount_point`](crate::loader::mount_point)).
///
/// # Examples
///
/// ```
/// use fsrouter::derive_endpoint;
///
/// assert_eq!(derive_endpoint("/routes/users/_id.ts", "/routes"), "/users/:id");
/// assert_eq!(derive_endpoint("/routes/index.ts", "/routes"), "/");
/// assert_eq!(derive_endpoint("/routes/root.ts", "/routes"), "/root");
/// ```
#[must_use]
pub fn derive_endpoint(file_path: &str, base_dir: &str) -> String {
    let path = file_path.replace('\\', "/");
    let base = base_dir.replace('\\', "/");

    let relative = path.replacen(&base, "", 1);
    let relative = relative.trim_start_matches('/');

    let parameterized = relative.replace('_', "/:");
    let without_index = INDEX_RE.replace(&parameterized, "");
    let without_ext = EXT_RE.replace(&without_index, "");

    let joined = format!("/{without_ext}");
    let collapsed = MULTI_SLASH_RE.replace_all(&joined, "/");
    let endpoint = collapsed.trim_end_matches('/');

    if endpoint.is_empty() {
        "/".to_string()
    } else {
        endpoint.to_string()
    }
}
