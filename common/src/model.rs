pub mod counts;
pub mod lookup;
pub mod protocol;
pub mod record;

pub use counts::{PortProtocol, PortProtocolCounts, TagCounts, UNRESOLVED_PROTOCOL, UNTAGGED};
pub use lookup::LookupTable;
pub use protocol::{ProtocolRange, ProtocolSpec, ProtocolTable};
pub use record::FlowRecord;
