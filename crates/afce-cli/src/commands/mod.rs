pub mod ask;
pub mod assess;
pub mod dispatch;
pub mod geometry;
pub mod perturb;
pub mod radar;
pub mod schema;
pub mod session;
pub mod state;
pub mod views;
