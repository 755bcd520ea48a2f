// SPDX-License-Identifier: AGPL-3.0-or-later
#![no_main]

use folio_core::{extract_text, render, Document, OutputFormat, RenderConfig, RendererRegistry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(doc) = Document::from_json(input) else {
        return;
    };

    let markup = render(&doc);
    assert_eq!(markup, render(&doc));
    let _ = markup.to_html();
    let _ = extract_text(&doc);

    let registry = RendererRegistry::with_defaults();
    let config = RenderConfig::default();
    for format in OutputFormat::ALL {
        registry
            .render(&doc, format, &config)
            .expect("default renderers never fail");
    }
});
