pub mod nominatim;
pub mod openaq;
