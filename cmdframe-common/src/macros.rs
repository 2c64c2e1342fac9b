#[macro_export]
macro_rules! ok_or_break {
    ($expression:expr) => {
        match $expression {
            Ok(v) => v,
            Err(_) => break,
        }
    };
}

/// Logs a high severity fault.
#[macro_export]
macro_rules! err {
    ($($t:tt)*) => {{
        let msg = format!($($t)*);
        $crate::tracing::error!("{}", &msg);
    }}
}
