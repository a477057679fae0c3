//! Machine assembly and boot image tests.
