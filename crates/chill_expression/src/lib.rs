//! How a break reads: flavor lines, stress bar, alert meter, bonus banners
//! and the help screen. Pure formatting over a `MoodSnapshot`.

mod composer;
pub mod visuals;

pub use composer::ChillComposer;
