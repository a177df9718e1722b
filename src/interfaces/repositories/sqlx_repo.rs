use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxCompanyRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxAddressRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxAdminUserRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSpecCategoryRepo {
    pub pool: PgPool,
}
