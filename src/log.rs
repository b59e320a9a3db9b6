//! Tagged diagnostic logging, routed through `defmt` the way the rest of
//! this hardware stack does (see `buttons.rs` for the same facade).
//! Never gates control flow — purely observability.
//!
//! Call sites are compiled out entirely under `cfg(test)` so host unit
//! tests never need a `defmt` global logger linked in.

macro_rules! logi {
    ($($arg:tt)*) => {
        #[cfg(not(test))]
        {
            defmt::info!($($arg)*);
        }
    };
}

macro_rules! logw {
    ($($arg:tt)*) => {
        #[cfg(not(test))]
        {
            defmt::warn!($($arg)*);
        }
    };
}

macro_rules! logd {
    ($($arg:tt)*) => {
        #[cfg(not(test))]
        {
            defmt::debug!($($arg)*);
        }
    };
}

pub(crate) use logd;
pub(crate) use logi;
pub(crate) use logw;
