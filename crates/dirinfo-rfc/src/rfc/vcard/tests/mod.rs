//! Cross-module tests over whole documents.
