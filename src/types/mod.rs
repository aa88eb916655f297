pub mod location;
pub mod month_day;
pub mod observation;
pub mod period;
pub mod unit;
