use sea_orm::sea_query::{Expr, IntoColumnRef, LikeExpr, SimpleExpr};

const LIKE_ESCAPE: char = '!';

/// Case-insensitive substring match that treats `%` and `_` in `text` literally
pub fn contains_literal<C: IntoColumnRef>(column: C, text: &str) -> SimpleExpr {
    Expr::col(column).like(LikeExpr::new(substring_pattern(text)).escape(LIKE_ESCAPE))
}

fn substring_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
