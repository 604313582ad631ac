mod clocksource;

pub use clocksource::ClockSource;
