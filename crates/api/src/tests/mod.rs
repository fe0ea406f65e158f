// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod bulk_tests;
mod error_translation_tests;
mod helpers;
mod passthrough_tests;
mod wire_format_tests;
