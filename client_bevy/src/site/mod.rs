mod contact_form;
mod core;
mod input;
mod listings;
mod page;
mod scene_view;

pub use contact_form::ContactFormPlugin;
pub use core::CorePlugin;
pub(crate) use core::UpdateSet;
pub use input::InputPlugin;
pub use listings::ListingsPlugin;
pub use page::PagePlugin;
pub use scene_view::SceneViewPlugin;
