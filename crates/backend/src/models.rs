// Database models for Diesel
use chrono::NaiveDate;
use diesel::prelude::*;

/// Insertable struct for new date selections
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::date_selections)]
pub struct NewDateSelection {
    pub room_id: String,
    pub name: String,
    pub selected_date: NaiveDate,
}
