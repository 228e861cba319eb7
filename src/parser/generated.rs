// Patterns validated by build.rs
include!(concat!(env!("OUT_DIR"), "/validated_regexes.rs"));
