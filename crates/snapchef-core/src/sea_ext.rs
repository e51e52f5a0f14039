use sea_orm::{
    EntityTrait, Order, QueryOrder, QuerySelect, Select, SelectTwo,
    sea_query::{Func, SimpleExpr},
};
use snapchef_domain::pagination::PageRequest;

pub trait OrderByRandom {
    fn order_by_random(self) -> Self;
}

impl<E> OrderByRandom for Select<E>
where
    E: EntityTrait,
{
    fn order_by_random(mut self) -> Self {
        QueryOrder::query(&mut self)
            .order_by_expr(SimpleExpr::FunctionCall(Func::random()), Order::Desc);
        self
    }
}

/// Apply `OFFSET`/`LIMIT` for a clamped [`PageRequest`].
pub trait SelectPage {
    fn page(self, request: PageRequest) -> Self;
}

impl<E> SelectPage for Select<E>
where
    E: EntityTrait,
{
    fn page(self, request: PageRequest) -> Self {
        self.offset(request.offset()).limit(u64::from(request.limit))
    }
}

impl<E, F> SelectPage for SelectTwo<E, F>
where
    E: EntityTrait,
    F: EntityTrait,
{
    fn page(self, request: PageRequest) -> Self {
        self.offset(request.offset()).limit(u64::from(request.limit))
    }
}

/// Escape `%`, `_` and `\` so user input can be embedded in a `LIKE` pattern.
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
