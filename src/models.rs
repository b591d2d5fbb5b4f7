pub mod catalogo;
pub mod estoque;
pub mod relatorios;
