mod build_base;
mod build_dirs;

pub use build_base::cmd_build_base;
pub use build_dirs::cmd_build_dirs;
