pub mod address;
pub mod export;
pub mod hours;
pub mod place;
pub mod search;
pub mod session;

pub use address::{decompose_address, AddressParts};
pub use export::{places_to_csv, ExportError, ExportRow, EXPORT_COLUMNS, EXPORT_FILENAME};
pub use hours::{format_opening_hours, DayHours};
pub use place::{BusinessStatus, LatLong, LocalizedText, Place, PriceLevel};
pub use search::{NearbySearch, RankPreference};
pub use session::{
    marker_color, MapBounds, MapSession, MarkerPlacement, MarkerState, ResultRow, SearchTicket,
};
