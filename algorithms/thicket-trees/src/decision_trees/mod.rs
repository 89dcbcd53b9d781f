mod algorithm;
mod forest;
mod hyperparams;
mod iter;
mod split;

pub use algorithm::*;
pub use forest::*;
pub use hyperparams::*;
pub use iter::*;
pub use split::*;
