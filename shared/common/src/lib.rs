pub use derive_more;
pub use float_cmp::ApproxEq;

pub use logging::{
    self,
    prelude::{
        my_crit as crit, my_debug as debug, my_error as error, my_info as info,
        my_trace as trace, my_warn as warn, slog, slog_scope,
    },
};

pub use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

pub type BoxedResult<T> = Result<T, Box<dyn std::error::Error>>;
