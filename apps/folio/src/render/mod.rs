// HTML output. All externally supplied text goes through `escape_html`.

pub mod escape;
pub mod page;

pub use escape::escape_html;
pub use page::{render_page, Notice, PageView};
