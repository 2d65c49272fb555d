use tabula_core::{Error, Value};
use time::{Date, Month, PrimitiveDateTime, Time};

pub(crate) struct ValueWrap(pub(crate) Value);

impl From<Value> for ValueWrap {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl mysql_async::prelude::FromValue for ValueWrap {
    type Intermediate = ValueWrap;
}

impl TryFrom<mysql_async::Value> for ValueWrap {
    type Error = mysql_async::FromValueError;
    fn try_from(value: mysql_async::Value) -> Result<Self, Self::Error> {
        Ok(match value {
            mysql_async::Value::NULL => Value::Null,
            mysql_async::Value::Bytes(v) => match String::from_utf8(v) {
                Ok(v) => Value::Varchar(v),
                Err(e) => Value::Blob(e.into_bytes().into()),
            },
            mysql_async::Value::Int(v) => Value::Int(v),
            mysql_async::Value::UInt(v) => Value::UInt(v),
            mysql_async::Value::Float(v) => Value::Float(v.into()),
            mysql_async::Value::Double(v) => Value::Float(v),
            mysql_async::Value::Date(year, month, day, hour, minute, second, microsecond) => {
                let month = match month {
                    1 => Month::January,
                    2 => Month::February,
                    3 => Month::March,
                    4 => Month::April,
                    5 => Month::May,
                    6 => Month::June,
                    7 => Month::July,
                    8 => Month::August,
                    9 => Month::September,
                    10 => Month::October,
                    11 => Month::November,
                    12 => Month::December,
                    _ => return Err(mysql_async::FromValueError(value)),
                };
                let date = Date::from_calendar_date(year as _, month, day)
                    .map_err(|_| mysql_async::FromValueError(value.clone()))?;
                let time = Time::from_hms_micro(hour, minute, second, microsecond)
                    .map_err(|_| mysql_async::FromValueError(value.clone()))?;
                Value::Timestamp(PrimitiveDateTime::new(date, time))
            }
            mysql_async::Value::Time(negative, days, hours, minutes, seconds, micro) => {
                let sign = if negative { "-" } else { "" };
                let hours = days * 24 + u32::from(hours);
                Value::Varchar(format!(
                    "{sign}{hours:02}:{minutes:02}:{seconds:02}.{micro:06}"
                ))
            }
        }
        .into())
    }
}

impl TryFrom<ValueWrap> for mysql_async::Value {
    type Error = Error;

    fn try_from(value: ValueWrap) -> Result<Self, Self::Error> {
        type MySQLValue = mysql_async::Value;
        Ok(match value.0 {
            Value::Null => MySQLValue::NULL,
            Value::Boolean(v) => MySQLValue::from(v),
            Value::Int(v) => MySQLValue::from(v),
            Value::UInt(v) => MySQLValue::from(v),
            Value::Float(v) => MySQLValue::from(v),
            Value::Varchar(v) => MySQLValue::from(v),
            Value::Blob(v) => MySQLValue::from(v.into_vec()),
            Value::Timestamp(v) => {
                let year = v.year();
                if year != year.clamp(0, u16::MAX as _) {
                    return Err(Error::msg(format!(
                        "Date {} is out of range for MySQL",
                        v
                    )));
                }
                MySQLValue::Date(
                    year as _,
                    v.month().into(),
                    v.day(),
                    v.hour(),
                    v.minute(),
                    v.second(),
                    v.microsecond(),
                )
            }
        })
    }
}
