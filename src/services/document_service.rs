use genpdf::{Element, elements, style};
use sqlx::PgPool;

use crate::{common::error::AppError, db::SalesRepository};

#[derive(Clone)]
pub struct DocumentService {
    repo: SalesRepository,
    pool: PgPool,
    fonts_dir: String,
}

impl DocumentService {
    pub fn new(repo: SalesRepository, pool: PgPool, fonts_dir: String) -> Self {
        Self { repo, pool, fonts_dir }
    }

    /// Gera o comprovante da venda em PDF, renderizado em memória.
    pub async fn generate_sale_pdf(&self, sale_id: i32) -> Result<Vec<u8>, AppError> {
        // 1. Busca os dados
        let sale = self.repo.find_sale(sale_id).await?;
        let items = self.repo.list_sale_products(sale_id).await?;

        let client_name: String =
            sqlx::query_scalar("SELECT full_name FROM clients WHERE id = $1")
                .bind(sale.client_id)
                .fetch_one(&self.pool)
                .await?;

        let local_name: String = sqlx::query_scalar("SELECT name FROM locals WHERE id = $1")
            .bind(sale.local_id)
            .fetch_one(&self.pool)
            .await?;

        struct ItemPrintData {
            name: String,
            quantity: rust_decimal::Decimal,
            price: rust_decimal::Decimal,
            total: rust_decimal::Decimal,
        }

        let mut print_items = Vec::new();
        for item in &items {
            let name: String = sqlx::query_scalar("SELECT name FROM products WHERE id = $1")
                .bind(item.product_id)
                .fetch_one(&self.pool)
                .await?;

            print_items.push(ItemPrintData {
                name,
                quantity: item.quantity,
                price: item.unit_price,
                total: item.line_total,
            });
        }

        // 2. Configura o PDF
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None)
            .map_err(|_| {
                AppError::PdfError(format!("Fonte não encontrada em {}", self.fonts_dir))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Venda #{}", sale.id));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new(local_name)
                .styled(style::Style::new().bold().with_font_size(18)),
        );

        doc.push(elements::Break::new(1.5));

        let invoice = match (&sale.invoice_serie, sale.invoice_number) {
            (Some(serie), Some(number)) => format!("FACTURA {}-{:07}", serie, number),
            _ => format!("VENTA #{}", sale.id),
        };
        doc.push(
            elements::Paragraph::new(invoice)
                .styled(style::Style::new().bold().with_font_size(14)),
        );

        doc.push(elements::Paragraph::new(format!(
            "Data: {}",
            sale.sale_date.format("%d/%m/%Y")
        )));
        doc.push(elements::Paragraph::new(format!("Cliente: {}", client_name)));

        doc.push(elements::Break::new(2));

        // --- TABELA DE ITENS ---
        // Pesos das colunas: Nome (4), Qtd (1), Preço (2), Total (2)
        let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Produto").styled(style_bold))
            .element(elements::Paragraph::new("Qtd").styled(style_bold))
            .element(elements::Paragraph::new("Unitário").styled(style_bold))
            .element(elements::Paragraph::new("Total").styled(style_bold))
            .push()
            .map_err(|e| AppError::PdfError(e.to_string()))?;

        for item in print_items {
            table
                .row()
                .element(elements::Paragraph::new(item.name))
                .element(elements::Paragraph::new(format!("{:.2}", item.quantity)))
                .element(elements::Paragraph::new(format!("{:.2}", item.price)))
                .element(elements::Paragraph::new(format!("{:.2}", item.total)))
                .push()
                .map_err(|e| AppError::PdfError(e.to_string()))?;
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAIS ---
        let mut subtotal_paragraph =
            elements::Paragraph::new(format!("Subtotal: {:.2}", sale.subtotal));
        subtotal_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(subtotal_paragraph);

        if sale.discount > rust_decimal::Decimal::ZERO {
            let mut discount_paragraph =
                elements::Paragraph::new(format!("Desconto: -{:.2}", sale.discount));
            discount_paragraph.set_alignment(genpdf::Alignment::Right);
            doc.push(discount_paragraph);
        }

        let mut total_paragraph = elements::Paragraph::new(format!("TOTAL: {:.2}", sale.total));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        // 3. Renderiza para buffer em memória
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::PdfError(e.to_string()))?;

        Ok(buffer)
    }
}
