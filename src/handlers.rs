pub mod produtos;
pub mod fornecedores;
pub mod categorias;
pub mod movimentacoes;
pub mod relatorios;
pub mod configuracoes;
