use std::str::FromStr;

use thiserror::Error;

use crate::domain::config_map::ConfigMap;

pub const SPECTROMETER_SECTION: &str = "Spectrometer";

/// Placeholder the spectrometer understands as "no second output file".
pub const NO_SECOND_OUTPUT: &str = "none";

pub const FFT_POINTS: &str = "FFTpoints";
pub const FFT_INTEGRATION_TIME_SEC: &str = "FFTIntegrationTimeSec";
pub const FFT_OVERLAP_FACTOR: &str = "FFToverlapFactor";
pub const WINDOW_TYPE: &str = "WindowType";
pub const BANDWIDTH_HZ: &str = "BandwidthHz";
pub const PCAL_OFFSET_HZ: &str = "PCalOffsetHz";
pub const SOURCE_FORMAT: &str = "SourceFormat";
pub const SOURCE_SKIP_SECONDS: &str = "SourceSkipSeconds";
pub const BITS_PER_SAMPLE: &str = "BitsPerSample";
pub const SOURCE_CHANNELS: &str = "SourceChannels";
pub const USE_FILE1_CHANNEL: &str = "UseFile1Channel";
pub const USE_FILE2_CHANNEL: &str = "UseFile2Channel";
pub const EXTRACT_PCAL: &str = "ExtractPCal";
pub const PLOT_PROGRESS: &str = "PlotProgress";
pub const DO_CROSS_POLARIZATION: &str = "DoCrossPolarization";
pub const SINK_FORMAT: &str = "SinkFormat";
pub const MAX_SOURCE_BUFFER_MB: &str = "MaxSourceBufferMB";
pub const NUM_CPU_CORES: &str = "NumCPUCores";
pub const BASE_FILENAME1: &str = "BaseFilename1";
pub const BASE_FILENAME2: &str = "BaseFilename2";

/// Keys a spectrometer INI must carry before it is handed to the executable.
pub const REQUIRED_KEYS: [&str; 20] = [
    FFT_POINTS,
    FFT_INTEGRATION_TIME_SEC,
    FFT_OVERLAP_FACTOR,
    WINDOW_TYPE,
    BANDWIDTH_HZ,
    PCAL_OFFSET_HZ,
    SOURCE_FORMAT,
    SOURCE_SKIP_SECONDS,
    BITS_PER_SAMPLE,
    SOURCE_CHANNELS,
    USE_FILE1_CHANNEL,
    USE_FILE2_CHANNEL,
    EXTRACT_PCAL,
    PLOT_PROGRESS,
    DO_CROSS_POLARIZATION,
    SINK_FORMAT,
    MAX_SOURCE_BUFFER_MB,
    NUM_CPU_CORES,
    BASE_FILENAME1,
    BASE_FILENAME2,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("setting {key} is missing")]
    MissingKey { key: String },
    #[error("setting {key} expects an integer, got {value:?}")]
    InvalidInteger { key: String, value: String },
    #[error("unknown setting {key}")]
    UnknownKey { key: String },
    #[error("override {raw:?} is not of the form KEY=VALUE")]
    MalformedOverride { raw: String },
}

/// Typed view of the keys the spectrometer reads from its INI file.
///
/// Numeric fields the executable parses itself (FFT length, bandwidth, ...)
/// stay textual so that values such as `1e6` pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectrometerSettings {
    pub fft_points: String,
    pub fft_integration_time_sec: String,
    pub fft_overlap_factor: u32,
    pub window_type: String,
    pub bandwidth_hz: String,
    pub pcal_offset_hz: String,
    pub source_format: String,
    pub source_skip_seconds: String,
    pub bits_per_sample: String,
    pub source_channels: String,
    pub use_file1_channel: u32,
    pub use_file2_channel: u32,
    pub extract_pcal: bool,
    pub plot_progress: bool,
    pub do_cross_polarization: bool,
    pub sink_format: String,
    pub max_source_buffer_mb: u32,
    pub num_cpu_cores: u32,
    pub base_filename1: String,
    pub base_filename2: String,
}

impl Default for SpectrometerSettings {
    fn default() -> Self {
        Self {
            fft_points: "1024".to_owned(),
            fft_integration_time_sec: "1.0".to_owned(),
            fft_overlap_factor: 2,
            window_type: "Cosine2".to_owned(),
            bandwidth_hz: "16000000".to_owned(),
            pcal_offset_hz: "10000".to_owned(),
            source_format: "RawSigned".to_owned(),
            source_skip_seconds: "0".to_owned(),
            bits_per_sample: "8".to_owned(),
            source_channels: "1".to_owned(),
            use_file1_channel: 0,
            use_file2_channel: 0,
            extract_pcal: false,
            plot_progress: false,
            do_cross_polarization: false,
            sink_format: "Binary".to_owned(),
            max_source_buffer_mb: 32,
            num_cpu_cores: 2,
            base_filename1: "spectrum".to_owned(),
            base_filename2: NO_SECOND_OUTPUT.to_owned(),
        }
    }
}

impl SpectrometerSettings {
    /// Builds settings from a map that already passed required-key validation.
    pub fn from_config_map(map: &ConfigMap) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        for key in REQUIRED_KEYS {
            let value = map.get(key).ok_or_else(|| SettingsError::MissingKey {
                key: key.to_owned(),
            })?;
            settings.set_field(key, value)?;
        }

        Ok(settings)
    }

    pub fn to_config_map(&self) -> ConfigMap {
        let mut map = ConfigMap::new();
        map.set(FFT_POINTS, &self.fft_points);
        map.set(FFT_INTEGRATION_TIME_SEC, &self.fft_integration_time_sec);
        map.set(FFT_OVERLAP_FACTOR, self.fft_overlap_factor.to_string());
        map.set(WINDOW_TYPE, &self.window_type);
        map.set(BANDWIDTH_HZ, &self.bandwidth_hz);
        map.set(PCAL_OFFSET_HZ, &self.pcal_offset_hz);
        map.set(SOURCE_FORMAT, &self.source_format);
        map.set(SOURCE_SKIP_SECONDS, &self.source_skip_seconds);
        map.set(BITS_PER_SAMPLE, &self.bits_per_sample);
        map.set(SOURCE_CHANNELS, &self.source_channels);
        map.set(USE_FILE1_CHANNEL, self.use_file1_channel.to_string());
        map.set(USE_FILE2_CHANNEL, self.use_file2_channel.to_string());
        map.set(EXTRACT_PCAL, yes_no(self.extract_pcal));
        map.set(PLOT_PROGRESS, yes_no(self.plot_progress));
        map.set(DO_CROSS_POLARIZATION, yes_no(self.do_cross_polarization));
        map.set(SINK_FORMAT, &self.sink_format);
        map.set(MAX_SOURCE_BUFFER_MB, self.max_source_buffer_mb.to_string());
        map.set(NUM_CPU_CORES, self.num_cpu_cores.to_string());
        map.set(BASE_FILENAME1, &self.base_filename1);
        map.set(BASE_FILENAME2, &self.base_filename2);
        map
    }

    /// Applies a single `KEY=VALUE` style change requested by the operator.
    ///
    /// Changing the source format also resets bits per sample and channel
    /// count to what that format implies.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.set_field(key, value)?;
        if key == SOURCE_FORMAT {
            self.apply_source_format_defaults();
        }

        Ok(())
    }

    /// Derives sample width and channel count from well-known format names.
    ///
    /// `VLBA1_1_8_2`-style and `MKIV...` names end in `<channels>_<bits>`;
    /// iBOB is always 8 bit single channel; for the Maxim ADC kit the
    /// 4 channel x 8 bit variant is assumed.
    pub fn apply_source_format_defaults(&mut self) {
        let format = self.source_format.to_ascii_lowercase();

        if format.starts_with("vlba") || format.starts_with("mkiv") {
            let chars: Vec<char> = format.chars().collect();
            if chars.len() < 3 {
                return;
            }
            let bits = chars[chars.len() - 1].to_digit(10);
            let channels = chars[chars.len() - 3].to_digit(10);
            if let (Some(bits), Some(channels)) = (bits, channels) {
                if bits > 0 && channels > 0 {
                    self.bits_per_sample = bits.to_string();
                    self.source_channels = channels.to_string();
                }
            }
        } else if format.starts_with("ibob") {
            self.bits_per_sample = "8".to_owned();
            self.source_channels = "1".to_owned();
        } else if format.starts_with("maxim") {
            self.bits_per_sample = "8".to_owned();
            self.source_channels = "4".to_owned();
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            FFT_POINTS => self.fft_points = value.to_owned(),
            FFT_INTEGRATION_TIME_SEC => self.fft_integration_time_sec = value.to_owned(),
            FFT_OVERLAP_FACTOR => self.fft_overlap_factor = parse_integer(key, value)?,
            WINDOW_TYPE => self.window_type = value.to_owned(),
            BANDWIDTH_HZ => self.bandwidth_hz = value.to_owned(),
            PCAL_OFFSET_HZ => self.pcal_offset_hz = value.to_owned(),
            SOURCE_FORMAT => self.source_format = value.to_owned(),
            SOURCE_SKIP_SECONDS => self.source_skip_seconds = value.to_owned(),
            BITS_PER_SAMPLE => self.bits_per_sample = value.to_owned(),
            SOURCE_CHANNELS => self.source_channels = value.to_owned(),
            USE_FILE1_CHANNEL => self.use_file1_channel = parse_integer(key, value)?,
            USE_FILE2_CHANNEL => self.use_file2_channel = parse_integer(key, value)?,
            EXTRACT_PCAL => self.extract_pcal = parse_yes_no(value),
            PLOT_PROGRESS => self.plot_progress = parse_yes_no(value),
            DO_CROSS_POLARIZATION => self.do_cross_polarization = parse_yes_no(value),
            SINK_FORMAT => self.sink_format = value.to_owned(),
            MAX_SOURCE_BUFFER_MB => self.max_source_buffer_mb = parse_integer(key, value)?,
            NUM_CPU_CORES => self.num_cpu_cores = parse_integer(key, value)?,
            BASE_FILENAME1 => self.base_filename1 = value.to_owned(),
            BASE_FILENAME2 => self.base_filename2 = value.to_owned(),
            _ => {
                return Err(SettingsError::UnknownKey {
                    key: key.to_owned(),
                })
            }
        }

        Ok(())
    }
}

/// Splits a command-line `KEY=VALUE` override on its first `=`.
pub fn parse_override(raw: &str) -> Result<(String, String), SettingsError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.trim().to_owned()))
        }
        _ => Err(SettingsError::MalformedOverride {
            raw: raw.to_owned(),
        }),
    }
}

pub fn parse_yes_no(value: &str) -> bool {
    value.eq_ignore_ascii_case("yes")
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn parse_integer<T: FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
    value.parse().map_err(|_| SettingsError::InvalidInteger {
        key: key.to_owned(),
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_map_round_trip_preserves_every_field() {
        let mut settings = SpectrometerSettings::default();
        settings.extract_pcal = true;
        settings.num_cpu_cores = 8;
        settings.window_type = "Hann".to_owned();

        let map = settings.to_config_map();
        let restored = SpectrometerSettings::from_config_map(&map).expect("settings should parse");

        assert_eq!(restored, settings);
        assert_eq!(map.get(EXTRACT_PCAL), Some("Yes"));
        assert_eq!(map.keys().collect::<Vec<_>>(), REQUIRED_KEYS);
    }

    #[test]
    fn from_config_map_reports_first_missing_key() {
        let mut map = SpectrometerSettings::default().to_config_map();
        map.remove(NUM_CPU_CORES);

        let error = SpectrometerSettings::from_config_map(&map).expect_err("must fail");

        assert_eq!(
            error,
            SettingsError::MissingKey {
                key: NUM_CPU_CORES.to_owned()
            }
        );
    }

    #[test]
    fn from_config_map_rejects_non_integer_spin_values() {
        let mut map = SpectrometerSettings::default().to_config_map();
        map.set(MAX_SOURCE_BUFFER_MB, "lots");

        let error = SpectrometerSettings::from_config_map(&map).expect_err("must fail");

        assert!(matches!(error, SettingsError::InvalidInteger { ref key, .. } if key == MAX_SOURCE_BUFFER_MB));
    }

    #[test]
    fn yes_no_parsing_is_case_insensitive() {
        assert!(parse_yes_no("YES"));
        assert!(parse_yes_no("yes"));
        assert!(!parse_yes_no("No"));
        assert!(!parse_yes_no("true"));
    }

    #[test]
    fn vlba_format_sets_channels_and_bits_from_name() {
        let mut settings = SpectrometerSettings::default();

        settings
            .apply_override(SOURCE_FORMAT, "VLBA1_1_4_2")
            .expect("override should apply");

        assert_eq!(settings.source_channels, "4");
        assert_eq!(settings.bits_per_sample, "2");
    }

    #[test]
    fn ibob_and_maxim_formats_use_fixed_defaults() {
        let mut settings = SpectrometerSettings::default();

        settings.apply_override(SOURCE_FORMAT, "iBOB").expect("ibob");
        assert_eq!((settings.source_channels.as_str(), settings.bits_per_sample.as_str()), ("1", "8"));

        settings.apply_override(SOURCE_FORMAT, "Maxim").expect("maxim");
        assert_eq!((settings.source_channels.as_str(), settings.bits_per_sample.as_str()), ("4", "8"));
    }

    #[test]
    fn unknown_format_leaves_sampling_untouched() {
        let mut settings = SpectrometerSettings::default();
        settings.bits_per_sample = "2".to_owned();

        settings
            .apply_override(SOURCE_FORMAT, "Mark5B")
            .expect("override should apply");

        assert_eq!(settings.bits_per_sample, "2");
        assert_eq!(settings.source_format, "Mark5B");
    }

    #[test]
    fn unknown_override_key_is_rejected() {
        let mut settings = SpectrometerSettings::default();

        let error = settings
            .apply_override("FFTPoints", "2048")
            .expect_err("key names are case sensitive");

        assert!(matches!(error, SettingsError::UnknownKey { .. }));
    }

    #[test]
    fn parse_override_splits_on_first_equals() {
        assert_eq!(
            parse_override("BaseFilename1=out=1").expect("valid override"),
            ("BaseFilename1".to_owned(), "out=1".to_owned())
        );
        assert!(parse_override("=1").is_err());
        assert!(parse_override("FFTpoints").is_err());
    }
}
