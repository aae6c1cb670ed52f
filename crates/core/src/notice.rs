//! Announcement of a newly created project.
//!
//! The caption is Telegram-flavoured Markdown (`*bold*`). Field values are
//! inserted as-is.

/// Shown in place of tools or client when the project has none.
pub const MISSING_VALUE: &str = "N/A";

/// What gets published to the outbound channel after a project is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProjectNotice {
    /// Markdown caption describing the project.
    pub caption: String,
    /// Public URL of every project image, in image order.
    pub photo_urls: Vec<String>,
}

impl NewProjectNotice {
    pub fn new(
        title: &str,
        category: &str,
        tools: Option<&[String]>,
        client: Option<&str>,
        photo_urls: Vec<String>,
    ) -> Self {
        Self {
            caption: build_caption(title, category, tools, client),
            photo_urls,
        }
    }
}

/// Render the announcement caption.
///
/// Each line ends in two spaces and the whole caption is wrapped in
/// newlines. An absent or empty tool list and an absent or empty client both render as
/// [`MISSING_VALUE`].
pub fn build_caption(
    title: &str,
    category: &str,
    tools: Option<&[String]>,
    client: Option<&str>,
) -> String {
    let tools = tools
        .map(|t| t.join(", "))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| MISSING_VALUE.to_string());
    let client = client.filter(|c| !c.is_empty()).unwrap_or(MISSING_VALUE);

    format!(
        "\n🚀 *New Project Uploaded!*  \n\
         📌 *Title:* {title}  \n\
         🖼 *Category:* {category}  \n\
         🛠 *Tools:* {tools}  \n\
         👤 *Client:* {client}  \n"
    )
}
