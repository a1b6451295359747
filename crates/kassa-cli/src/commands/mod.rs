mod check;
mod init;
mod today;

pub use check::execute as check;
pub use init::execute as init;
pub use today::{execute as today, TodayOptions};
