/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports describe everything the report core consumes from the
/// outside world: package enumeration, license classification, tabular
/// sinks, and the progress transcript.
pub mod outbound;
