mod invalidation;
