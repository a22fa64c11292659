use crate::core::MarginConfig;
use crate::error::{ChartError, ChartResult};

use super::ChartConfig;

pub(super) fn validate_chart_config(config: &ChartConfig) -> ChartResult<()> {
    if !config.width.is_finite()
        || !config.height.is_finite()
        || config.width < 0.0
        || config.height < 0.0
    {
        return Err(ChartError::InvalidViewport {
            width: config.width,
            height: config.height,
        });
    }
    validate_margin_config(config.margin)?;

    for (axis, scale) in [("x", &config.x_scale), ("y", &config.y_scale)] {
        for (name, value) in [
            ("padding", scale.padding),
            ("padding_inner", scale.padding_inner),
            ("padding_outer", scale.padding_outer),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(ChartError::InvalidConfig(format!(
                        "{axis}-scale {name} must be finite and >= 0"
                    )));
                }
            }
        }
    }

    Ok(())
}

fn validate_margin_config(margin: MarginConfig) -> ChartResult<()> {
    for (side, value) in [
        ("top", margin.top),
        ("right", margin.right),
        ("bottom", margin.bottom),
        ("left", margin.left),
    ] {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
    }
    Ok(())
}
