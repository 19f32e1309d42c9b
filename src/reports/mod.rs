//! Statistics over expense lists
//!
//! Pure functions deriving category breakdowns, monthly trends, date-window
//! subsets and headline summaries. Nothing here holds state or fails; empty
//! input gives empty or zero-valued results. Sums are exact and unrounded.

pub mod category;
pub mod monthly;
pub mod period;
pub mod summary;

pub use category::{category_totals, top_categories, CategoryTotal, DEFAULT_TOP_CATEGORIES};
pub use monthly::{monthly_trend, MonthlyData, DEFAULT_TREND_MONTHS};
pub use period::{current_month_expenses, filter_by_date_range, month_bounds};
pub use summary::SpendingSummary;
