pub mod api;
pub mod api_map;
pub mod event;
pub mod facet;
pub mod item;
pub mod key;
pub mod kinds;
pub mod position;

pub use api::{Api, ApiId, ApiSet};
pub use api_map::ApiMap;
pub use event::{EventLog, FacetValues, ReportEvent};
pub use facet::{Facet, FacetMap};
pub use item::{DocFile, Item, Symbol, SymbolKind};
pub use key::{ElementKey, KeyKind};
pub use kinds::{CountDomain, CountKind, Counts, Direction, ResultKind, ResultTable};
pub use position::{Position, RelativeIndex, RelativeKind};
