//! Command implementations.

pub mod build;
pub mod extract;
pub mod init;
pub mod item;
pub mod slot;
pub mod template;

pub use self::build::execute_build;
pub use self::extract::execute_extract;
pub use self::init::execute_init;
pub use self::item::execute_item;
pub use self::slot::execute_slot;
pub use self::template::execute_template;
