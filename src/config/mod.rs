//! Configuration for gitaddons
//!
//! # User Config (~/.config/gitaddons/config.toml)
//!
//! **Purpose**: Personal preferences, not checked into git
//!
//! **Settings**:
//! - `remote` - Remote to fetch, list, and rebase onto (default `origin`)
//! - `fetch` - Fetch before listing branches (default `true`)
//! - `rebase` - Rebase after switching (default `true`)
//! - `who.since` - Default time range for `gitaddons who` (default `1 week ago`)
//!
//! Every setting can be overridden with a `GITADDONS_*` environment variable
//! (`GITADDONS_REMOTE`, `GITADDONS_FETCH`, `GITADDONS_REBASE`,
//! `GITADDONS_WHO_SINCE`). The file location can be overridden with
//! `--config` or `GITADDONS_CONFIG_PATH`.

mod user;

pub use user::{UserConfig, WhoConfig, get_config_path, set_config_path};
