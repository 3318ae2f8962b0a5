/// UI widgets module
///
/// Custom widgets that go beyond the stock iced set:
/// - The before/after comparison slider canvas (compare.rs)

pub mod compare;
