// Link-preview pages for shared articles and pet profiles
pub mod article;
pub mod html;
pub mod pet;
pub mod site;

pub use article::{article_page, handle_article_share};
pub use html::{render_share_page, SharePage, Theme};
pub use pet::{ensure_absolute_url, handle_pet_share, pet_page, summarize};
pub use site::resolve_site_url;
