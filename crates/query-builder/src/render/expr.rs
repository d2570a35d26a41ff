use crate::{
    ast::expr::{Expr, Ident},
    render::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Value(val) => r.add_param(val.clone()),
            Expr::Raw(sql) => r.sql.push_str(sql),
            Expr::IsNull(expr) => {
                if expr.is_atomic() {
                    expr.render(r);
                } else {
                    r.sql.push('(');
                    expr.render(r);
                    r.sql.push(')');
                }
                r.sql.push_str(" IS NULL");
            }
            Expr::Case {
                condition,
                then,
                otherwise,
            } => {
                r.sql.push_str("CASE WHEN ");
                condition.render(r);
                r.sql.push_str(" THEN ");
                then.render(r);
                r.sql.push_str(" ELSE ");
                otherwise.render(r);
                r.sql.push_str(" END");
            }
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) {
        if let Some(qualifier) = &self.qualifier {
            r.sql.push_str(&r.dialect.quote_identifier(qualifier));
            r.sql.push('.');
        }
        r.sql.push_str(&r.dialect.quote_identifier(&self.name));
    }
}
