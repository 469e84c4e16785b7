/// The static "access restricted" view shown on lockdown.
///
/// Content is policy (the portal ships localized strings); rendering is a
/// minimal self-contained fragment with no external resources, since nothing
/// else will load once the page is locked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockScreen {
    pub title: String,
    pub message: String,
    pub contact: String,
}

impl LockScreen {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            contact: contact.into(),
        }
    }

    /// Render the restricted view. All strings are escaped: policy files are
    /// trusted-ish, but the restricted view must never become an injection
    /// vector itself.
    pub fn render(&self) -> String {
        format!(
            concat!(
                r#"<div class="hvk-restricted" role="alert">"#,
                "<h1>{}</h1>",
                "<p>{}</p>",
                r#"<p class="hvk-restricted-contact">{}</p>"#,
                "</div>"
            ),
            escape(&self.title),
            escape(&self.message),
            escape(&self.contact),
        )
    }
}

impl Default for LockScreen {
    fn default() -> Self {
        Self::new(
            "Access restricted",
            "This page is not available while an inspection tool is active. \
             Close it and reload the page.",
            "Contact support if you believe this is an error.",
        )
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
