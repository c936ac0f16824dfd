//! MAX17048 fuel gauge
//!
//! Only the state-of-charge register is used. Its high byte is whole percent
//! and its low byte is 1/256 percent.

use core::fmt;

use embedded_hal_async::i2c::I2c;
use twintail_remote::FuelGauge;

const MAX17048_ADDRESS: u8 = 0x36;
const REG_SOC: u8 = 0x04;

#[derive(Debug)]
pub enum Max17048Error<E> {
    I2c(E),
}

impl<E: fmt::Debug> fmt::Display for Max17048Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I2c(err) => write!(f, "MAX17048 I2C error: {:?}", err),
        }
    }
}

pub struct Max17048<I> {
    i2c: I,
}

impl<I: I2c> Max17048<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }
}

impl<I: I2c> FuelGauge for Max17048<I> {
    type Error = Max17048Error<I::Error>;

    async fn battery_percent(&mut self) -> Result<u8, Self::Error> {
        let mut soc = [0u8; 2];
        self.i2c
            .write_read(MAX17048_ADDRESS, &[REG_SOC], &mut soc)
            .await
            .map_err(Max17048Error::I2c)?;
        Ok(soc_percent(soc))
    }
}

/// Round the SOC register up to a whole percent, capped at 100
fn soc_percent([whole, fraction]: [u8; 2]) -> u8 {
    let percent = if fraction > 0 {
        whole.saturating_add(1)
    } else {
        whole
    };
    percent.min(100)
}
