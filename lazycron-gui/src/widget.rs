mod button;
mod dialog;
mod job_form;
mod job_table;
mod log_table;
mod notice_bar;
mod worker_table;

pub use button::*;
pub use dialog::*;
pub use job_form::*;
pub use job_table::*;
pub use log_table::*;
pub use notice_bar::*;
pub use worker_table::*;
