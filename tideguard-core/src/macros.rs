// Optional logging through the `log` facade

#[cfg(feature = "log")]
macro_rules! qc_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! qc_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! qc_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! qc_warn {
    ($($arg:tt)*) => {};
}
