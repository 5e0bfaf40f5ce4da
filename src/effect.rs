//! Effects - side effects declared by the reducer

use crate::state::DataSources;

#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch the character catalog and translation table together
    LoadLibrary { sources: DataSources },
}
