#[cfg(test)]
#[path = "themes_test.rs"]
mod tests;

use std::str::FromStr;

use anyhow::bail;
use anyhow::Result;
use ratatui::style::Color;
use strum::EnumIter;
use strum::EnumString;
use strum::IntoEnumIterator;
use strum::VariantNames;

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumString, VariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ThemeName {
    Dark,
    Light,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub badge: Color,
    pub bot: Color,
    pub error: Color,
    pub muted: Color,
    pub text: Color,
    pub user: Color,
}

impl Theme {
    fn dark() -> Theme {
        return Theme {
            accent: Color::Rgb(99, 102, 241),
            badge: Color::Rgb(165, 180, 252),
            bot: Color::Rgb(129, 140, 248),
            error: Color::Rgb(248, 113, 113),
            muted: Color::DarkGray,
            text: Color::Reset,
            user: Color::Rgb(96, 165, 250),
        };
    }

    fn light() -> Theme {
        return Theme {
            accent: Color::Rgb(79, 70, 229),
            badge: Color::Rgb(55, 48, 163),
            bot: Color::Rgb(67, 56, 202),
            error: Color::Rgb(185, 28, 28),
            muted: Color::Gray,
            text: Color::Black,
            user: Color::Rgb(37, 99, 235),
        };
    }
}

#[derive(Default)]
pub struct Themes {}

impl Themes {
    pub fn list() -> Vec<String> {
        return ThemeName::iter()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
    }

    pub fn get(theme_name: &str) -> Result<Theme> {
        let name = match ThemeName::from_str(theme_name) {
            Ok(name) => name,
            Err(_) => bail!(format!(
                "Theme {theme_name} does not exist. Possible values are: {}",
                ThemeName::VARIANTS.join(", ")
            )),
        };

        match name {
            ThemeName::Dark => return Ok(Theme::dark()),
            ThemeName::Light => return Ok(Theme::light()),
        }
    }
}
