use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

// Query string padrão de toda listagem: ?page=1&pageSize=10&sortBy=name&sortDir=asc&search=...
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<SortDir>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.page_size()
    }

    /// Termo de busca pronto para ILIKE, ou None se vazio.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s))
    }

    /// Monta o ORDER BY validando a coluna contra a lista permitida.
    /// Nunca interpola entrada crua no SQL.
    pub fn order_clause(&self, allowed: &[&str], default: &str) -> String {
        let column = self
            .sort_by
            .as_deref()
            .filter(|c| allowed.contains(c))
            .unwrap_or(default);
        let dir = self.sort_dir.unwrap_or(SortDir::Asc);
        format!("ORDER BY {} {}", column, dir.as_sql())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

// O envelope { data, pagination } que o frontend consome.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, params: &ListParams) -> Self {
        let page_size = params.page_size();
        let total_pages = if total == 0 {
            0
        } else {
            (total + page_size - 1) / page_size
        };
        Self {
            data,
            pagination: PageInfo {
                total,
                page: params.page(),
                page_size,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, page_size: Option<i64>) -> ListParams {
        ListParams {
            page,
            page_size,
            sort_by: None,
            sort_dir: None,
            search: None,
        }
    }

    #[test]
    fn pagina_e_tamanho_tem_defaults_sanos() {
        let p = params(None, None);
        assert_eq!(p.page(), 1);
        assert_eq!(p.page_size(), 10);
        assert_eq!(p.offset(), 0);

        let p = params(Some(0), Some(-5));
        assert_eq!(p.page(), 1);
        assert_eq!(p.page_size(), 1);

        let p = params(Some(3), Some(1000));
        assert_eq!(p.page_size(), 100);
        assert_eq!(p.offset(), 200);
    }

    #[test]
    fn order_clause_ignora_coluna_fora_da_lista() {
        let mut p = params(None, None);
        p.sort_by = Some("name; DROP TABLE users".into());
        assert_eq!(p.order_clause(&["name", "code"], "name"), "ORDER BY name ASC");

        p.sort_by = Some("code".into());
        p.sort_dir = Some(SortDir::Desc);
        assert_eq!(p.order_clause(&["name", "code"], "name"), "ORDER BY code DESC");
    }

    #[test]
    fn search_term_descarta_vazio() {
        let mut p = params(None, None);
        assert_eq!(p.search_term(), None);
        p.search = Some("   ".into());
        assert_eq!(p.search_term(), None);
        p.search = Some("juan".into());
        assert_eq!(p.search_term(), Some("%juan%".into()));
    }

    #[test]
    fn total_pages_arredonda_para_cima() {
        let p = params(Some(1), Some(10));
        let page: Page<i32> = Page::new(vec![], 25, &p);
        assert_eq!(page.pagination.total_pages, 3);

        let page: Page<i32> = Page::new(vec![], 0, &p);
        assert_eq!(page.pagination.total_pages, 0);
    }
}
