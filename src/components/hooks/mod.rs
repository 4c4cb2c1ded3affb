pub mod use_autosize;
pub mod use_expansion_pair;
pub mod use_tab_indent;

pub use use_autosize::*;
pub use use_expansion_pair::*;
pub use use_tab_indent::*;
