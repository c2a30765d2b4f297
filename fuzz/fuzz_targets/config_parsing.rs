#![no_main]
use libfuzzer_sys::fuzz_target;
use trafficview::ViewConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Both formats must reject or accept without panicking
        if let Ok(config) = ViewConfig::from_toml_str(input) {
            let _ = config.scale_ceiling_in();
            let _ = config.get_data_unit();
        }

        let legacy = ViewConfig::parse_nload_format(input);
        let _ = legacy.validate();
        let _ = legacy.scale_ceiling_out();
    }
});
