//! Utility functions

pub mod guid;
pub mod hash;
pub mod path;

pub use guid::{canonical_guid, is_guid, new_guid, render_guid};
pub use hash::{is_md5_hash, md5_file};
pub use path::{game_to_system_path, normalize_game_path, path_key, paths_equal, resolve_under};
