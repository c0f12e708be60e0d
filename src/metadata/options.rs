/// Limits applied while walking the directories of a segment.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// The maximum number of directories followed along the `next` chain, the default is 8.
    /// EXIF segments normally carry two: the primary image and its thumbnail.
    pub max_chain_len: usize,
    /// The maximum entry count of a single directory, the default is 1024. A directory that
    /// declares more is treated as corrupt and skipped.
    pub max_entries: usize,
    /// The purpose of this is to prevent all the fields of the struct from
    /// being public, as this would make adding new fields a major version
    /// bump.
    _non_exhaustive: (),
}

impl ParseOptions {
    /// A configuration that does not impose any limits.
    ///
    /// Cycles in the directory chain are still detected.
    pub fn unlimited() -> ParseOptions {
        ParseOptions {
            max_chain_len: usize::MAX,
            max_entries: u16::MAX as usize,
            _non_exhaustive: (),
        }
    }

    /// Set [`max_chain_len`][Self::max_chain_len].
    pub fn with_max_chain_len(mut self, max_chain_len: usize) -> Self {
        self.max_chain_len = max_chain_len;
        self
    }

    /// Set [`max_entries`][Self::max_entries].
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> ParseOptions {
        ParseOptions {
            max_chain_len: 8,
            max_entries: 1024,
            _non_exhaustive: (),
        }
    }
}
