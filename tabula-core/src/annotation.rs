use crate::{
    Grouping, MapType, OrmError, Result, SqlType,
    util::{parse_lengths, split_type_token},
};

/// One classified word of a field annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Exclude,
    Extends,
    ReadOnly,
    WriteOnly,
    PrimaryKey,
    Not,
    Null,
    AutoIncrement,
    Default,
    Type(SqlType, Option<(u32, u32)>),
    Index(Option<&'a str>),
    Unique(Option<&'a str>),
    Word(&'a str),
}

impl<'a> Token<'a> {
    /// Classifies a lower-cased word, `field` is only used to report errors.
    pub fn classify(field: &str, word: &'a str) -> Result<Token<'a>> {
        let token = match word {
            "-" => Token::Exclude,
            "extends" => Token::Extends,
            "<-" => Token::ReadOnly,
            "->" => Token::WriteOnly,
            "pk" => Token::PrimaryKey,
            "not" => Token::Not,
            "null" => Token::Null,
            "autoincr" => Token::AutoIncrement,
            "default" => Token::Default,
            _ => {
                let malformed = |reason: &str| OrmError::malformed(field, word, reason);
                let (name, args) = split_type_token(word)
                    .map_err(|_| malformed("unbalanced parentheses"))?;
                match name {
                    "index" | "unique" => {
                        let group = match args.map(str::trim) {
                            Some("") => return Err(malformed("empty group name").into()),
                            group => group,
                        };
                        if name == "index" {
                            Token::Index(group)
                        } else {
                            Token::Unique(group)
                        }
                    }
                    _ => match SqlType::lookup(name) {
                        Some(sql_type) => Token::Type(
                            sql_type,
                            args.map(|v| {
                                parse_lengths(v).map_err(|_| {
                                    malformed("length must be `(n)` or `(n,m)` with integer values")
                                })
                            })
                            .transpose()?,
                        ),
                        None if args.is_some() => {
                            return Err(malformed("unknown column type").into());
                        }
                        None => Token::Word(word),
                    },
                }
            }
        };
        Ok(token)
    }
}

/// Directives carried by a field annotation, for example `"varchar(64) not null unique"`.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub exclude: bool,
    pub extends: bool,
    pub map_type: MapType,
    pub primary_key: bool,
    pub nullable: Option<bool>,
    pub auto_increment: bool,
    pub default: Option<String>,
    pub sql_type: Option<SqlType>,
    pub lengths: Option<(u32, u32)>,
    pub index: Grouping,
    pub unique: Grouping,
    pub name: Option<String>,
}

impl Annotation {
    pub fn parse(field: &str, text: &str) -> Result<Annotation> {
        let text = text.to_lowercase();
        let mut words = text.split_whitespace().peekable();
        let mut result = Annotation::default();
        while let Some(word) = words.next() {
            match Token::classify(field, word)? {
                Token::Exclude => result.exclude = true,
                Token::Extends => result.extends = true,
                Token::ReadOnly => result.map_type = MapType::ReadOnly,
                Token::WriteOnly => result.map_type = MapType::WriteOnly,
                Token::PrimaryKey => {
                    result.primary_key = true;
                    result.nullable = Some(false);
                }
                Token::Not => {
                    if words.next_if_eq(&"null").is_none() {
                        return Err(OrmError::malformed(
                            field,
                            word,
                            "`not` must be followed by `null`",
                        )
                        .into());
                    }
                    result.nullable = Some(false);
                }
                Token::Null => result.nullable = Some(true),
                Token::AutoIncrement => result.auto_increment = true,
                Token::Default => {
                    let Some(literal) = words.next() else {
                        return Err(OrmError::malformed(
                            field,
                            word,
                            "`default` must be followed by a value",
                        )
                        .into());
                    };
                    result.default = Some(literal.to_owned());
                }
                Token::Type(sql_type, lengths) => {
                    result.sql_type = Some(sql_type);
                    result.lengths = lengths;
                }
                Token::Index(group) => {
                    result.index = group.map_or(Grouping::Single, |v| Grouping::Named(v.into()))
                }
                Token::Unique(group) => {
                    result.unique = group.map_or(Grouping::Single, |v| Grouping::Named(v.into()))
                }
                Token::Word(word) => {
                    if result.default.as_deref() != Some(word) {
                        result.name = Some(word.to_owned());
                    }
                }
            }
        }
        Ok(result)
    }
}
