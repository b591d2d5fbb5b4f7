// src/services/relatorio.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogoRepository, MovimentacaoRepository},
    models::{
        catalogo::Produto,
        estoque::{Movimentacao, TipoMovimentacao},
        relatorios::{RelatorioEstoque, RelatorioPeriodo, SaldoProduto},
    },
    services::projecao,
};

// Relatório financeiro de período: desempenho de VENDAS dentro de uma
// janela [inicio, fim] inclusiva. ENTRADAs não entram em receita/custo/lucro
// (isto é venda, não compra); elas são tabuladas à parte como investimento.

/// Função pura e determinística: duas chamadas com as mesmas entradas
/// produzem exatamente o mesmo relatório.
pub fn relatorio_periodo(
    movimentacoes: &[Movimentacao],
    produtos: &HashMap<Uuid, Produto>,
    inicio: NaiveDate,
    fim: NaiveDate,
) -> RelatorioPeriodo {
    if inicio > fim {
        // Janela degenerada: relatório vazio, responsabilidade do chamador,
        // mas nunca um erro daqui.
        return RelatorioPeriodo::vazio(inicio, fim);
    }

    let mut receita = Decimal::ZERO;
    let mut custo = Decimal::ZERO;
    let mut total_investido = Decimal::ZERO;
    let mut num_vendas: i64 = 0;

    for mov in movimentacoes {
        let data = mov.created_at.date_naive();
        if data < inicio || data > fim {
            continue;
        }

        let Some(produto) = produtos.get(&mov.id_produto) else {
            tracing::warn!(
                id_movimentacao = %mov.id,
                "Movimentação sem produto resolvível; excluída do relatório"
            );
            continue;
        };

        let quantidade = Decimal::from(mov.quantidade);
        match mov.tipo {
            TipoMovimentacao::Saida => {
                receita += quantidade * produto.preco_venda;
                // custo das mercadorias efetivamente VENDIDAS, não das compradas
                custo += quantidade * produto.preco_custo;
                num_vendas += 1;
            }
            TipoMovimentacao::Entrada => {
                total_investido += quantidade * produto.preco_custo;
            }
        }
    }

    let lucro = receita - custo;
    // Piso de 1 dia evita divisão por zero em janela de um dia só.
    let dias = (fim - inicio).num_days().max(0) + 1;
    let divisor = Decimal::from(dias.max(1));

    RelatorioPeriodo {
        inicio,
        fim,
        dias,
        receita,
        custo,
        lucro,
        num_vendas,
        total_investido,
        media_receita_dia: receita / divisor,
        media_lucro_dia: lucro / divisor,
    }
}

/// Filtros da tela de inventário, aplicados sobre as visões já projetadas:
/// ativo, categoria e pesquisa por nome (case-insensitive, como a busca da
/// tela). O filtro de ativo roda DEPOIS da projeção de propósito: o
/// histórico de produto inativo é dado válido e precisa entrar no fold.
pub fn filtrar_itens(
    mut itens: Vec<SaldoProduto>,
    apenas_ativos: bool,
    id_categoria: Option<Uuid>,
    nome: Option<&str>,
) -> Vec<SaldoProduto> {
    if apenas_ativos {
        itens.retain(|item| item.ativo);
    }
    if let Some(categoria) = id_categoria {
        itens.retain(|item| item.id_categoria == Some(categoria));
    }
    if let Some(termo) = nome {
        let termo = termo.to_lowercase();
        itens.retain(|item| item.nome.to_lowercase().contains(&termo));
    }
    itens
}

#[derive(Clone)]
pub struct RelatorioService {
    catalogo_repo: CatalogoRepository,
    movimentacao_repo: MovimentacaoRepository,
}

impl RelatorioService {
    pub fn new(
        catalogo_repo: CatalogoRepository,
        movimentacao_repo: MovimentacaoRepository,
    ) -> Self {
        Self {
            catalogo_repo,
            movimentacao_repo,
        }
    }

    pub async fn financeiro_periodo(
        &self,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<RelatorioPeriodo, AppError> {
        let produtos = self.catalogo_repo.listar_produtos(false).await?;
        let movimentacoes = self.movimentacao_repo.listar_todas().await?;

        let por_id: HashMap<Uuid, Produto> =
            produtos.into_iter().map(|p| (p.id, p)).collect();

        Ok(relatorio_periodo(&movimentacoes, &por_id, inicio, fim))
    }

    // Relatório de estoque: projeta o livro-razão inteiro sobre TODOS os
    // produtos (inativos inclusive, senão o histórico deles viraria
    // movimentação órfã) e só então aplica os filtros da tela.
    pub async fn estoque(
        &self,
        apenas_ativos: bool,
        id_categoria: Option<Uuid>,
        nome: Option<&str>,
    ) -> Result<RelatorioEstoque, AppError> {
        let produtos = self.catalogo_repo.listar_produtos(false).await?;
        let movimentacoes = self.movimentacao_repo.listar_todas().await?;

        let itens = filtrar_itens(
            projecao::projetar_saldos(&produtos, &movimentacoes),
            apenas_ativos,
            id_categoria,
            nome,
        );

        let valor_total = itens
            .iter()
            .map(|item| item.valor_estoque)
            .sum::<Decimal>();

        Ok(RelatorioEstoque { itens, valor_total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn produto(id: Uuid, preco_venda: Decimal, preco_custo: Decimal) -> Produto {
        Produto {
            id,
            nome: "Produto Teste".to_string(),
            preco_venda,
            preco_custo,
            estoque_minimo: 0,
            id_categoria: None,
            id_fornecedor: None,
            ativo: true,
            created_at: Utc::now(),
        }
    }

    fn mov_em(
        id_produto: Uuid,
        tipo: TipoMovimentacao,
        quantidade: i32,
        ano: i32,
        mes: u32,
        dia: u32,
    ) -> Movimentacao {
        Movimentacao {
            id: Uuid::new_v4(),
            id_produto,
            tipo,
            quantidade,
            motivo: None,
            created_at: Utc.with_ymd_and_hms(ano, mes, dia, 12, 0, 0).unwrap(),
        }
    }

    fn data(ano: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(ano, mes, dia).unwrap()
    }

    #[test]
    fn relatorio_de_janela_inclusiva_com_medias_diarias() {
        let id = Uuid::new_v4();
        let mut produtos = HashMap::new();
        produtos.insert(id, produto(id, Decimal::from(25), Decimal::from(15)));

        let movs = vec![
            mov_em(id, TipoMovimentacao::Saida, 4, 2025, 1, 5),
            // fora da janela: não conta
            mov_em(id, TipoMovimentacao::Saida, 2, 2025, 2, 1),
        ];

        let rel = relatorio_periodo(&movs, &produtos, data(2025, 1, 1), data(2025, 1, 10));

        assert_eq!(rel.dias, 10);
        assert_eq!(rel.receita, Decimal::from(100));
        assert_eq!(rel.custo, Decimal::from(60));
        assert_eq!(rel.lucro, Decimal::from(40));
        assert_eq!(rel.num_vendas, 1);
        assert_eq!(rel.media_receita_dia, Decimal::from(10));
        assert_eq!(rel.media_lucro_dia, Decimal::from(4));
    }

    #[test]
    fn entradas_nao_entram_na_receita_mas_somam_investimento() {
        let id = Uuid::new_v4();
        let mut produtos = HashMap::new();
        produtos.insert(id, produto(id, Decimal::from(30), Decimal::from(10)));

        let movs = vec![mov_em(id, TipoMovimentacao::Entrada, 5, 2025, 3, 10)];

        let rel = relatorio_periodo(&movs, &produtos, data(2025, 3, 1), data(2025, 3, 31));

        assert_eq!(rel.receita, Decimal::ZERO);
        assert_eq!(rel.custo, Decimal::ZERO);
        assert_eq!(rel.num_vendas, 0);
        assert_eq!(rel.total_investido, Decimal::from(50));
    }

    #[test]
    fn janela_invertida_devolve_relatorio_vazio() {
        let produtos = HashMap::new();
        let rel = relatorio_periodo(&[], &produtos, data(2025, 5, 10), data(2025, 5, 1));

        assert_eq!(rel, RelatorioPeriodo::vazio(data(2025, 5, 10), data(2025, 5, 1)));
    }

    #[test]
    fn janela_de_um_dia_divide_por_um() {
        let id = Uuid::new_v4();
        let mut produtos = HashMap::new();
        produtos.insert(id, produto(id, Decimal::from(8), Decimal::from(3)));

        let movs = vec![mov_em(id, TipoMovimentacao::Saida, 2, 2025, 6, 15)];

        let rel = relatorio_periodo(&movs, &produtos, data(2025, 6, 15), data(2025, 6, 15));

        assert_eq!(rel.dias, 1);
        assert_eq!(rel.media_receita_dia, rel.receita);
    }

    fn item(nome: &str, ativo: bool, id_categoria: Option<Uuid>) -> SaldoProduto {
        use crate::models::relatorios::StatusEstoque;
        SaldoProduto {
            id_produto: Uuid::new_v4(),
            nome: nome.to_string(),
            id_categoria,
            estoque_minimo: 0,
            ativo,
            saldo: 3,
            saldo_bruto: 3,
            status: StatusEstoque::Ok,
            valor_estoque: Decimal::from(10),
        }
    }

    #[test]
    fn filtro_por_nome_e_case_insensitive() {
        let itens = vec![
            item("Café Torrado", true, None),
            item("Açúcar Cristal", true, None),
        ];

        let filtrado = filtrar_itens(itens, true, None, Some("cafÉ"));

        assert_eq!(filtrado.len(), 1);
        assert_eq!(filtrado[0].nome, "Café Torrado");
    }

    #[test]
    fn filtro_de_ativos_remove_inativos_depois_da_projecao() {
        // O produto inativo entra na projeção (histórico válido) e só é
        // removido aqui, na visão da tela.
        let itens = vec![item("Ativo", true, None), item("Arquivado", false, None)];

        let filtrado = filtrar_itens(itens, true, None, None);

        assert_eq!(filtrado.len(), 1);
        assert!(filtrado[0].ativo);
    }

    #[test]
    fn filtro_de_categoria_combina_com_os_demais() {
        let categoria = Uuid::new_v4();
        let itens = vec![
            item("Café Torrado", true, Some(categoria)),
            item("Café Solúvel", true, None),
            item("Café Antigo", false, Some(categoria)),
        ];

        let filtrado = filtrar_itens(itens, true, Some(categoria), Some("café"));

        assert_eq!(filtrado.len(), 1);
        assert_eq!(filtrado[0].nome, "Café Torrado");
    }

    #[test]
    fn relatorio_e_deterministico() {
        let id = Uuid::new_v4();
        let mut produtos = HashMap::new();
        produtos.insert(id, produto(id, Decimal::from(12), Decimal::from(7)));
        let movs = vec![
            mov_em(id, TipoMovimentacao::Saida, 3, 2025, 4, 2),
            mov_em(id, TipoMovimentacao::Entrada, 10, 2025, 4, 3),
        ];

        let a = relatorio_periodo(&movs, &produtos, data(2025, 4, 1), data(2025, 4, 30));
        let b = relatorio_periodo(&movs, &produtos, data(2025, 4, 1), data(2025, 4, 30));

        assert_eq!(a, b);
    }
}
