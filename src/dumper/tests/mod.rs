//! Dump engine behavior tests, split by concern.

mod units;
