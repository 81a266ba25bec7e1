// Domain types and value objects
pub mod bar;
pub mod ticker_timeframe;

// Re-export commonly used types
pub use bar::Bar;
pub use ticker_timeframe::TickerTimeframe;
