// Copyright (C) 2024 Haiyang Liao <haiyangliao@nju.edu.cn>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::fmt;

use chrono::prelude::*;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::Error;

/// Locales whose default date-time rendering we know how to reproduce.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "ja-JP")]
    JaJp,
    #[serde(rename = "de-DE")]
    DeDe,
}

impl Locale {
    fn pattern(&self) -> &'static str {
        match self {
            // 2024/5/29 08:05:09
            Locale::ZhCn => "%Y/%-m/%-d %H:%M:%S",
            // 5/29/2024, 8:05:09 AM
            Locale::EnUs => "%-m/%-d/%Y, %-I:%M:%S %p",
            // 29/05/2024, 08:05:09
            Locale::EnGb => "%d/%m/%Y, %H:%M:%S",
            // 2024/5/29 8:05:09
            Locale::JaJp => "%Y/%-m/%-d %-H:%M:%S",
            // 29.5.2024, 08:05:09
            Locale::DeDe => "%-d.%-m.%Y, %H:%M:%S",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Locale::ZhCn => "zh-CN",
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::JaJp => "ja-JP",
            Locale::DeDe => "de-DE",
        };

        write!(f, "{}", name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimestampFormat {
    locale: Locale,
    timezone: Tz,
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat {
            locale: Locale::ZhCn,
            timezone: chrono_tz::Asia::Shanghai,
        }
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.locale, self.timezone.name())
    }
}

impl TimestampFormat {
    pub fn new(locale: Locale, timezone: &str) -> Result<TimestampFormat, Error> {
        let timezone = timezone
            .parse::<Tz>()
            .map_err(|e| Error::Provider(format!("unknown timezone {}: {}", timezone, e)))?;

        Ok(TimestampFormat { locale, timezone })
    }

    pub fn format(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.timezone)
            .format(self.locale.pattern())
            .to_string()
    }
}
