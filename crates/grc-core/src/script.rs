//! Weapon script serialization.
//!
//! The server stores a weapon as an `(image, script)` pair. The editor shows
//! it as a single document whose first line names the image:
//!
//! ```text
//! //#IMAGE: bomb.png
//!
//! function onCreated() { ... }
//! ```

/// Marker opening the image header line.
pub const IMAGE_HEADER: &str = "//#IMAGE:";

/// Joins a weapon's image and script into one editable document.
///
/// # Examples
///
/// ```
/// use grc_core::script::join_weapon_script;
///
/// let text = join_weapon_script("bomb.png", "//#CLIENTSIDE\n");
/// assert_eq!(text, "//#IMAGE: bomb.png\n\n//#CLIENTSIDE\n");
/// ```
#[must_use]
pub fn join_weapon_script(image: &str, script: &str) -> String {
    format!("{IMAGE_HEADER} {image}\n\n{script}")
}

/// Splits an edited weapon document back into `(image, script)`.
///
/// Without a header line the image is empty and the whole text is the
/// script. The returned script always ends with a newline.
///
/// # Examples
///
/// ```
/// use grc_core::script::{join_weapon_script, split_weapon_script};
///
/// let (image, script) = split_weapon_script(&join_weapon_script("a.png", "x = 1;\n"));
/// assert_eq!(image, "a.png");
/// assert_eq!(script, "x = 1;\n");
///
/// let (image, script) = split_weapon_script("x = 1;");
/// assert_eq!(image, "");
/// assert_eq!(script, "x = 1;\n");
/// ```
#[must_use]
pub fn split_weapon_script(text: &str) -> (String, String) {
    let (image, body) = match text.strip_prefix(IMAGE_HEADER) {
        Some(rest) => match rest.split_once('\n') {
            // One blank line separates the header from the script
            Some((header, body)) => (header.trim(), body.strip_prefix('\n').unwrap_or(body)),
            None => (rest.trim(), ""),
        },
        None => ("", text),
    };

    let mut script = body.to_string();
    if !script.ends_with('\n') {
        script.push('\n');
    }

    (image.to_string(), script)
}
